// demonstrates the difference between singleton and prototype scopes

use beanery_coach::coach::Coach;
use beanery_coach::wiring::register_prototype_coach;
use beanery_di::bean::BeanPtr;
use beanery_di::container::BeanContainer;
use tracing_subscriber::EnvFilter;

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut container = BeanContainer::new();
    register_prototype_coach(&mut container).expect("error registering coaching beans");

    // "prototype_coach" is prototype-scoped, so each request constructs a
    // fresh instance
    let coach = container
        .bean_by_name::<dyn Coach + Send + Sync>("prototype_coach")
        .expect("error creating coach");
    let alpha_coach = container
        .bean_by_name::<dyn Coach + Send + Sync>("prototype_coach")
        .expect("error creating coach");

    // prints "Pointing to same instance: false"
    println!(
        "Pointing to same instance: {}",
        BeanPtr::ptr_eq(&coach, &alpha_coach)
    );

    // the fixed fortune provider they share is a singleton, so both coaches
    // delegate to the same instance behind the scenes
    println!("{}", coach.daily_fortune());
    println!("{}", alpha_coach.daily_fortune());

    container.close();
}
