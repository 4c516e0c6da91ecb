//! Assistant capability boundary.
//!
//! Nearby-parking and roadside-recovery search are answered by an
//! external text-generation service. That service is deliberately kept
//! behind the [`TextGenerator`] trait: the rest of the crate builds
//! prompts and parses responses without knowing which vendor (if any)
//! is wired in.

use std::future::Future;

use tracing::debug;

use crate::geo::Coordinate;

/// Error type for assistant requests.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The backing service could not be reached or refused the request.
    #[error("Assistant service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with nothing usable.
    #[error("Assistant returned an empty response")]
    EmptyResponse,
}

/// An opaque text-generation capability.
///
/// Implementations wrap whatever external service the application uses.
/// Tests use canned responses.
pub trait TextGenerator: Send + Sync {
    /// Generate a text completion for the given prompt.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

/// A place returned by an assistant search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceSuggestion {
    /// Place name.
    pub name: String,

    /// Whatever detail followed the name (address, rate, phone number).
    pub detail: String,
}

/// Build the prompt for a nearby-parking search.
pub fn nearby_parking_prompt(origin: Coordinate, limit: usize) -> String {
    format!(
        "List up to {limit} public car parking locations near {origin}. \
         One per line, formatted as: name - address or rate. No other text."
    )
}

/// Build the prompt for a roadside-recovery search.
pub fn recovery_services_prompt(origin: Coordinate) -> String {
    format!(
        "List towing and roadside recovery services operating near {origin}. \
         One per line, formatted as: name - phone number. No other text."
    )
}

/// Parse a line-oriented assistant response into place suggestions.
///
/// Tolerates the usual decoration: leading bullets ("-", "*") and list
/// numbers are stripped, blank lines skipped. A line splits into name
/// and detail on the first " - "; a line without one becomes a
/// suggestion with an empty detail.
pub fn parse_place_lines(text: &str) -> Vec<PlaceSuggestion> {
    text.lines()
        .filter_map(|line| {
            let line = strip_list_decoration(line.trim());
            if line.is_empty() {
                return None;
            }
            let (name, detail) = match line.split_once(" - ") {
                Some((name, detail)) => (name.trim(), detail.trim()),
                None => (line, ""),
            };
            Some(PlaceSuggestion {
                name: name.to_string(),
                detail: detail.to_string(),
            })
        })
        .collect()
}

/// Strip a leading bullet or list number from a response line.
fn strip_list_decoration(line: &str) -> &str {
    let line = line
        .trim_start_matches(['-', '*', '•'])
        .trim_start();
    match line.split_once('.') {
        Some((number, rest)) if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) => {
            rest.trim_start()
        }
        _ => line,
    }
}

/// Find parking locations near a coordinate via the given generator.
pub async fn find_nearby_parking<G: TextGenerator>(
    generator: &G,
    origin: Coordinate,
    limit: usize,
) -> Result<Vec<PlaceSuggestion>, AssistantError> {
    let prompt = nearby_parking_prompt(origin, limit);
    let response = generator.generate(&prompt).await?;

    let mut suggestions = parse_place_lines(&response);
    if suggestions.is_empty() {
        return Err(AssistantError::EmptyResponse);
    }
    suggestions.truncate(limit);

    debug!(origin = %origin, count = suggestions.len(), "Nearby parking search complete");
    Ok(suggestions)
}

/// Find roadside recovery services near a coordinate.
pub async fn find_recovery_services<G: TextGenerator>(
    generator: &G,
    origin: Coordinate,
) -> Result<Vec<PlaceSuggestion>, AssistantError> {
    let prompt = recovery_services_prompt(origin);
    let response = generator.generate(&prompt).await?;

    let suggestions = parse_place_lines(&response);
    if suggestions.is_empty() {
        return Err(AssistantError::EmptyResponse);
    }

    debug!(origin = %origin, count = suggestions.len(), "Recovery service search complete");
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generator that replays a canned response.
    struct CannedGenerator {
        response: Result<String, String>,
    }

    impl CannedGenerator {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
            }
        }

        fn unavailable(msg: &str) -> Self {
            Self {
                response: Err(msg.to_string()),
            }
        }
    }

    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, AssistantError> {
            self.response
                .clone()
                .map_err(AssistantError::Unavailable)
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(18.5204, 73.8567).unwrap()
    }

    #[test]
    fn test_prompts_carry_the_origin() {
        let prompt = nearby_parking_prompt(origin(), 5);
        assert!(prompt.contains("18.520400"));
        assert!(prompt.contains("73.856700"));
        assert!(prompt.contains('5'));

        let prompt = recovery_services_prompt(origin());
        assert!(prompt.contains("18.520400"));
        assert!(prompt.contains("recovery"));
    }

    #[test]
    fn test_parse_plain_lines() {
        let text = "Central Mall Parking - Jangli Maharaj Rd, 40/hr\n\
                    Station West Lot - free after 8pm\n";
        let places = parse_place_lines(text);

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Central Mall Parking");
        assert_eq!(places[0].detail, "Jangli Maharaj Rd, 40/hr");
        assert_eq!(places[1].name, "Station West Lot");
    }

    #[test]
    fn test_parse_strips_bullets_and_numbers() {
        let text = "1. First Lot - a\n- Second Lot - b\n* Third Lot - c\n\n";
        let places = parse_place_lines(text);

        let names: Vec<_> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First Lot", "Second Lot", "Third Lot"]);
    }

    #[test]
    fn test_parse_line_without_detail() {
        let places = parse_place_lines("Just A Name");
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Just A Name");
        assert_eq!(places[0].detail, "");
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_place_lines("").is_empty());
        assert!(parse_place_lines("\n  \n").is_empty());
    }

    #[tokio::test]
    async fn test_find_nearby_parking_truncates_to_limit() {
        let generator = CannedGenerator::ok(
            "A - 1\nB - 2\nC - 3\nD - 4\nE - 5\nF - 6\nG - 7",
        );
        let places = find_nearby_parking(&generator, origin(), 5).await.unwrap();
        assert_eq!(places.len(), 5);
    }

    #[tokio::test]
    async fn test_find_nearby_parking_empty_response() {
        let generator = CannedGenerator::ok("\n\n");
        let result = find_nearby_parking(&generator, origin(), 5).await;
        assert!(matches!(result, Err(AssistantError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let generator = CannedGenerator::unavailable("connection refused");
        let result = find_recovery_services(&generator, origin()).await;
        assert!(matches!(result, Err(AssistantError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_find_recovery_services() {
        let generator =
            CannedGenerator::ok("Quick Tow - 020 1234 5678\nHighway Assist - 020 8765 4321");
        let places = find_recovery_services(&generator, origin()).await.unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].name, "Highway Assist");
    }
}
