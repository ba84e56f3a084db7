use crate::features::donations::dtos::LogDonationDto;

/// A validated donation form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    pub owner_name: String,
    pub email: String,
    pub housing: Option<String>,
    pub grad_year: Option<String>,
    pub category_name: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
}

impl From<LogDonationDto> for Donation {
    fn from(dto: LogDonationDto) -> Self {
        Self {
            owner_name: dto.donor_name.trim().to_string(),
            email: dto.email.trim().to_string(),
            housing: optional(dto.housing),
            grad_year: optional(dto.grad_year),
            category_name: dto.category_name.trim().to_string(),
            description: optional(dto.description),
            photo_url: optional(dto.photo_url),
        }
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
