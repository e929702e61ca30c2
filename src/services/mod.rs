pub mod breakdown;
pub mod bucketizer;
pub mod overview;
