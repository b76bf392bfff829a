pub mod usage_writer;
