pub mod bhava_house;
pub mod birth_record;
pub mod dignity;
pub mod planet_position;
