pub mod csv_upload;
