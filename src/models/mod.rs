pub mod rate;
