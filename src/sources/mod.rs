pub mod memory;
pub mod service;
pub mod supabase;
pub mod traits;
pub mod types;

pub use memory::MemoryRepository;
pub use service::CityService;
pub use supabase::SupabaseRepository;
pub use traits::CityRepository;
pub use types::Snapshot;
