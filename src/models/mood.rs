use rand::Rng;
use serde::{Deserialize, Serialize};

/// Genre identifier in TMDB's numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenreId(pub u32);

impl std::fmt::Display for GenreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of moods the application understands
///
/// Each mood maps to exactly one TMDB genre. The mapping is static data,
/// not derived at runtime, so resolution and aggregation never disagree
/// about what a mood means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Excited,
    Relaxed,
    Adventurous,
    Romantic,
    Thrilling,
    Mysterious,
    Scary,
    Funny,
    Inspiring,
    Fantasy,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Mood {
    /// All moods, in catalog order
    pub const ALL: [Mood; 11] = [
        Mood::Excited,
        Mood::Relaxed,
        Mood::Adventurous,
        Mood::Romantic,
        Mood::Thrilling,
        Mood::Mysterious,
        Mood::Scary,
        Mood::Funny,
        Mood::Inspiring,
        Mood::Fantasy,
        Mood::SciFi,
    ];

    /// The user-facing label, also the wire representation
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Excited => "Excited",
            Mood::Relaxed => "Relaxed",
            Mood::Adventurous => "Adventurous",
            Mood::Romantic => "Romantic",
            Mood::Thrilling => "Thrilling",
            Mood::Mysterious => "Mysterious",
            Mood::Scary => "Scary",
            Mood::Funny => "Funny",
            Mood::Inspiring => "Inspiring",
            Mood::Fantasy => "Fantasy",
            Mood::SciFi => "Sci-Fi",
        }
    }

    /// The TMDB genre this mood maps to
    pub fn genre(&self) -> GenreId {
        let id = match self {
            Mood::Excited => 28,      // Action
            Mood::Relaxed => 18,      // Drama
            Mood::Adventurous => 12,  // Adventure
            Mood::Romantic => 10749,  // Romance
            Mood::Thrilling => 53,    // Thriller
            Mood::Mysterious => 9648, // Mystery
            Mood::Scary => 27,        // Horror
            Mood::Funny => 35,        // Comedy
            Mood::Inspiring => 99,    // Documentary
            Mood::Fantasy => 14,      // Fantasy
            Mood::SciFi => 878,       // Science Fiction
        };
        GenreId(id)
    }

    /// Looks up a mood by its exact label
    pub fn from_label(label: &str) -> Option<Mood> {
        Mood::ALL.iter().copied().find(|m| m.label() == label)
    }

    /// Picks a mood uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Mood {
        Mood::ALL[rng.gen_range(0..Mood::ALL.len())]
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_label_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_label(mood.label()), Some(mood));
        }
    }

    #[test]
    fn test_from_label_unknown() {
        assert_eq!(Mood::from_label("Melancholy"), None);
        assert_eq!(Mood::from_label("excited"), None);
        assert_eq!(Mood::from_label(""), None);
    }

    #[test]
    fn test_genre_mapping() {
        assert_eq!(Mood::Excited.genre(), GenreId(28));
        assert_eq!(Mood::Romantic.genre(), GenreId(10749));
        assert_eq!(Mood::SciFi.genre(), GenreId(878));
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Mood::SciFi).unwrap();
        assert_eq!(json, r#""Sci-Fi""#);

        let mood: Mood = serde_json::from_str(r#""Funny""#).unwrap();
        assert_eq!(mood, Mood::Funny);
    }

    #[test]
    fn test_random_is_deterministic_for_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(Mood::random(&mut a), Mood::random(&mut b));
    }

    #[test]
    fn test_random_covers_more_than_one_mood() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws: std::collections::HashSet<Mood> =
            (0..100).map(|_| Mood::random(&mut rng)).collect();
        assert!(draws.len() > 1);
    }
}
