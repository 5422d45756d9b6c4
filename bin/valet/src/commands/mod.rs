pub mod memory;
pub mod onboard;
pub mod prefs;
pub mod run_cmd;
pub mod skills;
pub mod status;
