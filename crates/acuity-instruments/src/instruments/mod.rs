pub mod abcd2;
pub mod anion_gap;
pub mod curb65;
pub mod fib4;
pub mod gcs;
pub mod meld;
pub mod phq9;
pub mod qsofa;
pub mod rancho;
pub mod sofa;
pub mod wells_dvt;
