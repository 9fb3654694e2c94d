pub mod machine_profile;
