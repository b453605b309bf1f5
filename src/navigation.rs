use crate::models::Role;

/// NavEntry
///
/// One sidebar/menu item: an icon identifier, a display label, and the route it
/// links to. Icon names follow the frontend icon set's kebab-case identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub icon: &'static str,
    pub label: &'static str,
    pub path: &'static str,
}

const fn entry(icon: &'static str, label: &'static str, path: &'static str) -> NavEntry {
    NavEntry { icon, label, path }
}

// The per-role menus are enumerated by design, not computed. Order is the
// rendered order.

const ADMIN_MENU: &[NavEntry] = &[
    entry("home", "Dashboard", "/admin/dashboard"),
    entry("users", "Users", "/admin/users"),
    entry("graduation-cap", "Instructors", "/admin/instructors"),
    entry("book-open", "Courses", "/admin/courses"),
    entry("megaphone", "Announcements", "/admin/announcements"),
    entry("shield", "System", "/admin/system"),
    entry("message-square", "Feedback", "/admin/feedback"),
    entry("users", "Community", "/community"),
    entry("bot", "AI Assistant", "/chatbot"),
    entry("settings", "Settings", "/settings"),
];

const INSTRUCTOR_MENU: &[NavEntry] = &[
    entry("home", "Dashboard", "/instructor/dashboard"),
    entry("book-open", "My Courses", "/instructor/courses"),
    entry("users", "Students", "/instructor/students"),
    entry("file-text", "Tests", "/instructor/tests"),
    entry("video", "Classrooms", "/classrooms"),
    entry("calendar", "Attendance", "/instructor/attendance"),
    entry("users", "Community", "/community"),
    entry("bar-chart-3", "Analytics", "/instructor/analytics"),
    entry("message-square", "Feedback", "/instructor/feedback"),
    entry("user", "My Profile", "/instructor/profile"),
    entry("bot", "AI Assistant", "/chatbot"),
    entry("settings", "Settings", "/settings"),
];

const STUDENT_MENU: &[NavEntry] = &[
    entry("home", "Dashboard", "/dashboard"),
    entry("book-open", "Browse Courses", "/courses"),
    entry("book-open", "My Learning", "/my-learning"),
    entry("file-text", "Tests", "/tests"),
    entry("video", "Classrooms", "/classrooms"),
    entry("calendar", "My Attendance", "/student/attendance"),
    entry("users", "Community", "/community"),
    entry("graduation-cap", "Instructors", "/instructors"),
    entry("message-square", "Feedback", "/feedback"),
    entry("bell", "Notifications", "/notifications"),
    entry("bot", "AI Assistant", "/chatbot"),
    entry("settings", "Settings", "/settings"),
];

/// menu_for
///
/// Maps a role to its fixed, ordered navigation list. Total by construction:
/// an absent role (session not yet resolved, or an unrecognized role already
/// normalized at deserialization) falls back to the student menu, so callers
/// can never render an empty navigation.
pub fn menu_for(role: Option<Role>) -> &'static [NavEntry] {
    match role.unwrap_or(Role::Student) {
        Role::Admin => ADMIN_MENU,
        Role::Instructor => INSTRUCTOR_MENU,
        Role::Student => STUDENT_MENU,
    }
}

/// default_route
///
/// The role-specific landing route used for the post-login redirect.
pub fn default_route(role: Option<Role>) -> &'static str {
    match role.unwrap_or(Role::Student) {
        Role::Admin => "/admin/dashboard",
        Role::Instructor => "/instructor/dashboard",
        Role::Student => "/dashboard",
    }
}
