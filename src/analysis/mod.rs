pub mod draft;
pub mod match_maps;
pub mod wards;
