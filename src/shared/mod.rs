pub mod academic_year;
pub mod constants;
pub mod types;
pub mod validation;
#[cfg(test)]
pub mod test_helpers;
