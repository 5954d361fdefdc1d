// Kernel - infrastructure shared by the server and its tests

pub mod test_dependencies;

pub use test_dependencies::MockUserStore;
