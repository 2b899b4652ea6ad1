use serde::{Deserialize, Serialize};

/// RFM customer segments, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomerSegment {
    #[serde(rename = "VIP")]
    Vip,
    Regular,
    Ocasional,
    Inativo,
}

impl CustomerSegment {
    /// Code as it appears in the segmentation table
    pub fn code(&self) -> &'static str {
        match self {
            CustomerSegment::Vip => "VIP",
            CustomerSegment::Regular => "Regular",
            CustomerSegment::Ocasional => "Ocasional",
            CustomerSegment::Inativo => "Inativo",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CustomerSegment::Vip => "VIP",
            CustomerSegment::Regular => "Regular",
            CustomerSegment::Ocasional => "Occasional",
            CustomerSegment::Inativo => "Inactive",
        }
    }

    /// All segments in display order
    pub fn all() -> Vec<CustomerSegment> {
        vec![
            CustomerSegment::Vip,
            CustomerSegment::Regular,
            CustomerSegment::Ocasional,
            CustomerSegment::Inativo,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "VIP" => Some(CustomerSegment::Vip),
            "Regular" => Some(CustomerSegment::Regular),
            "Ocasional" => Some(CustomerSegment::Ocasional),
            "Inativo" => Some(CustomerSegment::Inativo),
            _ => None,
        }
    }
}

impl std::fmt::Display for CustomerSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_matches_ord() {
        let mut shuffled = vec![
            CustomerSegment::Inativo,
            CustomerSegment::Vip,
            CustomerSegment::Ocasional,
            CustomerSegment::Regular,
        ];
        shuffled.sort();
        assert_eq!(shuffled, CustomerSegment::all());
    }

    #[test]
    fn test_code_roundtrip() {
        for segment in CustomerSegment::all() {
            assert_eq!(CustomerSegment::from_code(segment.code()), Some(segment));
        }
        assert_eq!(CustomerSegment::from_code("Gold"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&CustomerSegment::Vip).unwrap();
        assert_eq!(json, "\"VIP\"");
        let parsed: CustomerSegment = serde_json::from_str("\"Inativo\"").unwrap();
        assert_eq!(parsed, CustomerSegment::Inativo);
    }
}
