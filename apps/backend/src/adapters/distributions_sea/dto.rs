//! DTOs for distributions_sea adapter.

/// DTO for inserting a new distribution row.
///
/// All fields are already in their persisted text form.
#[derive(Debug, Clone)]
pub struct DistributionCreate {
    pub distribution_number: String,
    pub sequence_number: String,
    pub hash_code: String,
    pub deck_order: String,
}

impl DistributionCreate {
    pub fn new(
        distribution_number: impl Into<String>,
        sequence_number: impl Into<String>,
        hash_code: impl Into<String>,
        deck_order: impl Into<String>,
    ) -> Self {
        Self {
            distribution_number: distribution_number.into(),
            sequence_number: sequence_number.into(),
            hash_code: hash_code.into(),
            deck_order: deck_order.into(),
        }
    }
}
