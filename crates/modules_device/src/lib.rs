use deno_core::Extension;

pub mod modules;

pub fn extensions() -> Vec<Extension> {
    vec![modules::device::init()]
}
