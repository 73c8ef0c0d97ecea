//! Payment terms offered by a venue and snapshotted onto bookings.

use serde::{Deserialize, Serialize};

use super::{Percentage, ValidationError};

/// Maximum length of the free-text payment description.
pub const MAX_OTHER_TERMS_LENGTH: usize = 500;

/// How a performer gets paid.
///
/// All parts are optional and may be combined (e.g. a guarantee plus a door
/// split). Money is held in integer cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTerms {
    /// Guaranteed fee in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guaranteed_amount: Option<i64>,

    /// Share of door/bar revenue paid to the performer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_split: Option<Percentage>,

    /// Free-text terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl PaymentTerms {
    /// Validates and normalizes the terms.
    ///
    /// Blank free text is dropped rather than stored.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        if let Some(amount) = self.guaranteed_amount {
            if amount < 0 {
                return Err(ValidationError::out_of_range(
                    "paymentTerms.guaranteedAmount",
                    0,
                    i64::MAX,
                    amount,
                ));
            }
        }

        let other = match self.other {
            Some(text) if text.trim().is_empty() => None,
            Some(text) => {
                let text = text.trim().to_string();
                let len = text.chars().count();
                if len > MAX_OTHER_TERMS_LENGTH {
                    return Err(ValidationError::too_long(
                        "paymentTerms.other",
                        MAX_OTHER_TERMS_LENGTH,
                        len,
                    ));
                }
                Some(text)
            }
            None => None,
        };

        Ok(Self {
            guaranteed_amount: self.guaranteed_amount,
            revenue_split: self.revenue_split,
            other,
        })
    }

    /// Returns true if no term has been specified.
    pub fn is_unspecified(&self) -> bool {
        self.guaranteed_amount.is_none() && self.revenue_split.is_none() && self.other.is_none()
    }
}
