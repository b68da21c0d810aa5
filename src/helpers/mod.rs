pub mod patch_name;
pub mod template;
