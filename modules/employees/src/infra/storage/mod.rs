pub mod entity;
pub mod mapper;
pub mod schema;
pub mod sea_orm_repo;

pub use sea_orm_repo::SeaOrmEmployeesRepository;
