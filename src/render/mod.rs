pub(crate) mod code_image;
pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod layout;
pub(crate) mod output;
pub(crate) mod slide;
