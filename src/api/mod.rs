pub mod enhance;

pub use enhance::{
    handle_enhance, handle_enhance_png, EnhanceQuery, EnhanceRequest, EnhanceResponse,
    __path_handle_enhance, __path_handle_enhance_png,
};
