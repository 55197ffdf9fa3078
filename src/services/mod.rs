pub mod tag_mapper;

pub use tag_mapper::ChoiceTagMapper;
