pub mod account;
pub mod post;

pub use account::PostgresCredentialStore;
pub use post::PostgresPostRepository;
