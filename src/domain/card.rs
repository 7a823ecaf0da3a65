/// The behavior a test card number triggers at the processor.
///
/// Only six literal card numbers are known. Anything else classifies as
/// `None` and is treated as a denial by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardProfile {
    AuthorizeOk,
    AuthorizeDenied,
    AuthorizeAndCaptureOk,
    AuthorizeAndCaptureDenied,
    CaptureOk,
    CaptureDenied,
}

impl CardProfile {
    pub const ALL: [CardProfile; 6] = [
        CardProfile::AuthorizeOk,
        CardProfile::AuthorizeDenied,
        CardProfile::AuthorizeAndCaptureOk,
        CardProfile::AuthorizeAndCaptureDenied,
        CardProfile::CaptureOk,
        CardProfile::CaptureDenied,
    ];

    /// Looks up the profile bound to `card_number`.
    pub fn classify(card_number: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|profile| profile.card_number() == card_number)
    }

    /// The literal card number bound to this profile.
    pub fn card_number(self) -> &'static str {
        match self {
            CardProfile::AuthorizeOk => "5340749871433512",
            CardProfile::AuthorizeDenied => "5558702121154658",
            CardProfile::AuthorizeAndCaptureOk => "5326107541057732",
            CardProfile::AuthorizeAndCaptureDenied => "5430442567033801",
            CardProfile::CaptureOk => "5277253663231678",
            CardProfile::CaptureDenied => "5473598178407565",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_cards() {
        for profile in CardProfile::ALL {
            assert_eq!(CardProfile::classify(profile.card_number()), Some(profile));
        }
    }

    #[test]
    fn test_classify_unknown_card() {
        assert_eq!(CardProfile::classify("4111111111111111"), None);
        assert_eq!(CardProfile::classify(""), None);
        // Surrounding whitespace is not trimmed
        assert_eq!(CardProfile::classify(" 5340749871433512"), None);
    }

    #[test]
    fn test_card_numbers_are_distinct() {
        let numbers: std::collections::HashSet<_> =
            CardProfile::ALL.iter().map(|p| p.card_number()).collect();
        assert_eq!(numbers.len(), CardProfile::ALL.len());
    }
}
