pub mod boleto_reader;
pub mod conversion_writer;
