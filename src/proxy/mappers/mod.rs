// Inbound body mappers

pub mod pinecone;

pub use pinecone::PineconeQuery;
