use core::Registry;

mod cli;

fn main() {
    let mut registry = Registry::new();
    cli::register_global_flags(&mut registry);
    cli::run::register(&mut registry);

    cli::execute(&registry);
}
