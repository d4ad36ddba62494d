//! Terminal output helpers: result notifications and table rendering.

pub mod table;

/// Mutation outcome notifications, shown after create/update/delete.
pub fn notify_success(message: &str) {
    println!("✅ {}", message);
}

pub fn notify_error(message: &str) {
    eprintln!("❌ {}", message);
}
