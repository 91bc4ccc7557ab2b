pub mod entity;
pub mod mapper;
pub mod schema;
pub mod sea_orm_repo;

pub use schema::ensure_schema;
pub use sea_orm_repo::SeaOrmClientesRepository;
