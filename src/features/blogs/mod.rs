//! Blog posts with an ordered list of uploaded media.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/blog` | Public | Sorted, paginated or random list |
//! | GET | `/api/v1/blog/search` | Public | Title search |
//! | GET | `/api/v1/blog/{id}` | Public | Detail, counts a view |
//! | POST | `/api/v1/blog/add` | Admin | Create with up to 5 media |
//! | PATCH/POST | `/api/v1/blog/{id}` | Admin | Update fields and reconcile media |
//! | PATCH | `/api/v1/blog/{id}/set-rank` | Admin | Set rank |
//! | PATCH | `/api/v1/blog/{id}/set-main-media` | Admin | Pick primary media |
//! | DELETE | `/api/v1/blog/{id}` | Super admin | Delete with media files |

pub mod dtos;
pub mod handlers;
pub mod media_edit;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::BlogState;
pub use services::BlogService;
