use wasm_bindgen::prelude::*;

mod factory;
mod scenes;
mod script;

use factory::MaskNovel;

novel_web::export_novel!(MaskNovel, "mask-novel");
