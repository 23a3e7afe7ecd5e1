pub mod confirm_dialog;
pub mod nav;
pub mod student_dialog;
pub mod toast;
