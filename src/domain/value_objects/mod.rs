pub mod body;
pub mod nakshatra;
pub mod points;
pub mod sign;
