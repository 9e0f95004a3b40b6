//! What happens to input that no intent claims.
//!
//! Filler phrases are removed as plain substrings, with no word-boundary
//! check, so "pleased" loses its "please" as well.

use tracing::{debug, warn};

use crate::{InformationLookup, Response, Utterance};

pub const FILLER_PHRASES: [&str; 6] = [
    "please",
    "can you",
    "could you",
    "would you",
    "i want",
    "i need",
];

pub const GREETINGS: [&str; 3] = ["hi", "hello", "hey"];

/// Cleaned queries shorter than this many characters are not looked up.
pub const MIN_QUERY_LEN: usize = 3;

/// Strips every filler phrase from the normalized text and trims the result.
#[must_use]
pub fn clean_query(normalized: &str) -> String {
    FILLER_PHRASES
        .iter()
        .fold(normalized.to_string(), |query, filler| {
            query.replace(filler, "")
        })
        .trim()
        .to_string()
}

/// Too short or a bare greeting: not worth a lookup.
#[must_use]
pub fn is_too_thin(query: &str) -> bool {
    query.chars().count() < MIN_QUERY_LEN || GREETINGS.contains(&query)
}

#[must_use]
pub fn not_understood(utterance: &Utterance) -> Response {
    Response::speech(format!(
        "I'm not sure how to process '{}'. Try saying 'help' for a list of commands.",
        utterance.raw()
    ))
}

/// Runs the fallback chain for an utterance that matched no intent.
pub async fn respond(utterance: &Utterance, lookup: &dyn InformationLookup) -> Response {
    let query = clean_query(utterance.normalized());
    if is_too_thin(&query) {
        debug!("Fallback query '{query}' too thin for a lookup");
        return not_understood(utterance);
    }

    match lookup.search(&query).await {
        Ok(Some(info)) => Response::speech(info),
        Ok(None) => Response::speech(format!("I couldn't find information about {query}.")),
        Err(e) => {
            warn!("Information lookup failed for '{query}': {e}");
            Response::speech(format!("I couldn't find information about {query}."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_all_fillers_anywhere() {
        assert_eq!(
            clean_query("can you please tell jokes i want"),
            "tell jokes"
        );
        assert_eq!(clean_query("could you would you i need  rust "), "rust");
    }

    #[test]
    fn removal_ignores_word_boundaries() {
        assert_eq!(clean_query("pleased to meet you"), "d to meet you");
        assert_eq!(clean_query("ship wanted"), "ship wanted");
        assert_eq!(clean_query("hi want"), "h");
    }

    #[test]
    fn thin_queries() {
        assert!(is_too_thin(""));
        assert!(is_too_thin("ok"));
        assert!(is_too_thin("hi"));
        assert!(is_too_thin("hey"));
        assert!(is_too_thin("hello"));
        assert!(!is_too_thin("mars"));
        assert!(!is_too_thin("hey you"));
    }

    #[test]
    fn canned_message_quotes_raw_text() {
        let response = not_understood(&Utterance::new("Hi Please"));
        assert_eq!(
            response.text(),
            Some("I'm not sure how to process 'Hi Please'. Try saying 'help' for a list of commands.")
        );
    }
}
