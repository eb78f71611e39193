use core::Context;

mod env;
mod extensions;
mod run;

pub fn run(context: &Context) {
    run::run(context);
}
