use crate::memory_sketches::errors::SketchApiError;

// Providers report moderation refusals as free text. Keep every wording we
// match on here so a provider changing its message is a one line fix.
const MODERATION_MARKERS: [&str; 4] = [
    "nsfw",
    "safety system",
    "moderation_blocked",
    "content_policy_violation",
];

pub fn is_moderation_rejection(message: &str) -> bool {
    let message = message.to_lowercase();
    MODERATION_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

pub fn classify_provider_error(provider: &'static str, detail: String) -> SketchApiError {
    if is_moderation_rejection(&detail) {
        tracing::warn!("{} flagged the image: {}", provider, detail);
        return SketchApiError::ModerationRejection;
    }

    SketchApiError::Upstream { provider, detail }
}

#[cfg(test)]
mod tests {
    use super::{classify_provider_error, is_moderation_rejection};
    use crate::memory_sketches::errors::SketchApiError;

    #[test]
    fn detects_known_moderation_wordings() {
        assert!(is_moderation_rejection(
            "NSFW content detected. Try running it again, or try a different prompt."
        ));
        assert!(is_moderation_rejection(
            "Your request was rejected as a result of our safety system."
        ));
        assert!(is_moderation_rejection("400 moderation_blocked"));
        assert!(!is_moderation_rejection("CUDA out of memory"));
    }

    #[test]
    fn other_errors_stay_upstream_failures() {
        assert_eq!(
            classify_provider_error("replicate", "nsfw content detected".to_string()),
            SketchApiError::ModerationRejection
        );
        assert_eq!(
            classify_provider_error("replicate", "502 bad gateway".to_string()),
            SketchApiError::Upstream {
                provider: "replicate",
                detail: "502 bad gateway".to_string(),
            }
        );
    }
}
