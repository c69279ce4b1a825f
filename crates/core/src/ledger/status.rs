//! Lifecycle status of a ledger line item.

use serde::{Deserialize, Serialize};

/// Status of a receivable or payable, parsed from the stored free-text label.
///
/// The store keeps whatever label the import wrote (`Recebido`, `Pago`,
/// `Em aberto`, ...). Everything downstream works on this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerStatus {
    /// Not yet received or paid.
    Open,
    /// Receipt or payment confirmed.
    Settled,
    /// Cancelled or reversed.
    Cancelled,
    /// Label outside the known vocabulary. Never counts as settled.
    Unrecognized,
}

const OPEN_LABELS: &[&str] = &[
    "PENDENTE",
    "EM ABERTO",
    "ABERTO",
    "A RECEBER",
    "A PAGAR",
    "VENCIDO",
];
const SETTLED_LABELS: &[&str] = &["RECEBIDO", "PAGO", "LIQUIDADO", "BAIXADO"];
const CANCELLED_LABELS: &[&str] = &["CANCELADO", "ESTORNADO"];

impl LedgerStatus {
    /// Parses a stored label, case-insensitively and ignoring surrounding
    /// whitespace. Unknown labels map to [`LedgerStatus::Unrecognized`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_uppercase();
        let normalized = normalized.as_str();
        if SETTLED_LABELS.contains(&normalized) {
            Self::Settled
        } else if OPEN_LABELS.contains(&normalized) {
            Self::Open
        } else if CANCELLED_LABELS.contains(&normalized) {
            Self::Cancelled
        } else {
            Self::Unrecognized
        }
    }

    /// Returns true if receipt or payment has been confirmed.
    ///
    /// Totals reported as "received" or "paid" must filter on this.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }

    /// Returns true if the line item is still outstanding.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns true if the stored label was outside the known vocabulary.
    #[must_use]
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized)
    }

    /// Canonical label written by the seeder and shown in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Open => "Pendente",
            Self::Settled => "Recebido",
            Self::Cancelled => "Cancelado",
            Self::Unrecognized => "Desconhecido",
        }
    }
}

impl std::fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Settled => write!(f, "settled"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

impl std::str::FromStr for LedgerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "settled" => Ok(Self::Settled),
            "cancelled" => Ok(Self::Cancelled),
            "unrecognized" => Ok(Self::Unrecognized),
            _ => Err(format!("Unknown status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Recebido", LedgerStatus::Settled)]
    #[case("RECEBIDO", LedgerStatus::Settled)]
    #[case("  recebido ", LedgerStatus::Settled)]
    #[case("Pago", LedgerStatus::Settled)]
    #[case("Liquidado", LedgerStatus::Settled)]
    #[case("Pendente", LedgerStatus::Open)]
    #[case("Em aberto", LedgerStatus::Open)]
    #[case("A receber", LedgerStatus::Open)]
    #[case("Cancelado", LedgerStatus::Cancelled)]
    #[case("", LedgerStatus::Unrecognized)]
    #[case("Recebido parcialmente", LedgerStatus::Unrecognized)]
    fn test_from_label(#[case] label: &str, #[case] expected: LedgerStatus) {
        assert_eq!(LedgerStatus::from_label(label), expected);
    }

    #[test]
    fn test_only_settled_is_settled() {
        assert!(LedgerStatus::Settled.is_settled());
        assert!(!LedgerStatus::Open.is_settled());
        assert!(!LedgerStatus::Cancelled.is_settled());
        assert!(!LedgerStatus::Unrecognized.is_settled());
    }

    #[test]
    fn test_canonical_labels_round_trip() {
        for status in [
            LedgerStatus::Open,
            LedgerStatus::Settled,
            LedgerStatus::Cancelled,
        ] {
            assert_eq!(LedgerStatus::from_label(status.label()), status);
        }
    }

    #[test]
    fn test_display_from_str() {
        assert_eq!(LedgerStatus::Settled.to_string(), "settled");
        assert_eq!("SETTLED".parse::<LedgerStatus>(), Ok(LedgerStatus::Settled));
        assert!("paid-ish".parse::<LedgerStatus>().is_err());
    }
}
