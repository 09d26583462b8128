pub mod proxied_data;
pub mod std_faker;
