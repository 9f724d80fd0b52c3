//! Category tree: a self-referential hierarchy of blog categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v1/category/add` | Admin | Create a category (root or child) |
//! | GET | `/api/v1/category` | Admin | Full nested tree |
//! | GET | `/api/v1/category/parent` | Admin | Root categories |
//! | GET | `/api/v1/category/sub-category` | Admin | Non-root categories |
//! | POST | `/api/v1/category/sub-category` | Admin | Create a child of an existing category |
//! | GET | `/api/v1/category/{id}` | Admin | Category with its paginated blogs |
//! | PATCH | `/api/v1/category/{id}` | Admin | Partial update / re-parent |
//! | DELETE | `/api/v1/category/{id}` | Admin | Cascading delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tree;

pub use services::CategoryService;
