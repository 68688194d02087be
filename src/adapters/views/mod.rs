pub mod file_details;
