pub mod company;
pub mod job;

pub use company::CompanyRepository;
pub use job::JobRepository;
