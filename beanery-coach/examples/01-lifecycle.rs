// demonstrates lazy construction, post-construct hooks and reverse-order
// destruction on container close; run with RUST_LOG=debug to see the
// lifecycle events

use beanery_coach::coach::Coach;
use beanery_coach::wiring::register_coaching_beans;
use beanery_di::container::BeanContainer;
use std::fs;
use tracing_subscriber::EnvFilter;

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let directory = tempfile::tempdir().expect("error creating temp dir");
    let fortune_file = directory.path().join("fortune-data.txt");
    fs::write(
        &fortune_file,
        "A fresh can of balls awaits you\nYour serve will improve tomorrow\n",
    )
    .expect("error writing fortune data");

    let mut container = BeanContainer::new();
    register_coaching_beans(&mut container, &fortune_file)
        .expect("error registering coaching beans");

    // the fortune file is only read now, when the coach (and therefore its
    // fortune provider) is constructed for the first time
    let coach = container
        .bean::<dyn Coach + Send + Sync>()
        .expect("error creating coach");

    println!("{}", coach.daily_workout());
    println!("{}", coach.daily_fortune());

    // destroys the coach before the provider it depends on
    container.close();
}
