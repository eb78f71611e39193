use deno_core::Extension;

pub(crate) fn extensions() -> Vec<Extension> {
    modules_device::extensions()
}
