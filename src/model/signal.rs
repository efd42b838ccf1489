use serde::{Serialize, Serializer};

/// Regime tag emitted by the hedge-ratio crossover.
///
/// `None` means no asset is favored and the strategy stays flat. Exported
/// tables carry the numeric code rather than the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    #[default]
    None,
    FavorA,
    FavorB,
}

impl Signal {
    /// Numeric code used in exported tables (0, 1, 2).
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::FavorA => 1,
            Self::FavorB => 2,
        }
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_table_convention() {
        assert_eq!(Signal::None.code(), 0);
        assert_eq!(Signal::FavorA.code(), 1);
        assert_eq!(Signal::FavorB.code(), 2);
        assert_eq!(Signal::default(), Signal::None);
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&[Signal::None, Signal::FavorA, Signal::FavorB]).unwrap();
        assert_eq!(json, "[0,1,2]");
    }
}
