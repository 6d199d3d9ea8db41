pub mod result_mapper;
