pub mod catalog;
pub mod config;
pub mod constants;
pub mod document;
pub mod env_state;
pub mod gcpd;
pub mod gcpd_errors;
pub mod markup;
pub mod photometry;
pub mod query;
pub mod raw_table;
pub mod report;
pub mod system_list;
