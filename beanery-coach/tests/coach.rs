use beanery_coach::coach::Coach;
use beanery_coach::fortune::{FortuneService, FIXED_FORTUNES};
use beanery_coach::wiring::{
    register_coaching_beans, register_prototype_coach, FILE_QUALIFIER, FIXED_QUALIFIER,
};
use beanery_di::bean::BeanPtr;
use beanery_di::container::BeanContainer;
use beanery_di::error::BeanResolutionError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FILE_FORTUNES: [&str; 3] = [
    "A fresh can of balls awaits you",
    "Your serve will improve tomorrow",
    "Today you will play a tie-break",
];

fn write_fortune_file(directory: &TempDir) -> PathBuf {
    let path = directory.path().join("fortune-data.txt");
    fs::write(&path, FILE_FORTUNES.join("\n")).unwrap();
    path
}

#[test]
fn should_serve_fortunes_from_the_configured_file() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_fortune_file(&directory);

    let mut container = BeanContainer::new();
    register_coaching_beans(&mut container, &path).unwrap();

    let coach = container.bean::<dyn Coach + Send + Sync>().unwrap();

    assert_eq!(coach.daily_workout(), "Practice your backhand volley");

    // the coach is wired to the "file" qualifier, so fortunes always come
    // from the file's line set, never from the fixed in-memory list
    for _ in 0..20 {
        let fortune = coach.daily_fortune();
        assert!(FILE_FORTUNES.contains(&fortune.as_str()));
        assert!(!FIXED_FORTUNES.contains(&fortune.as_str()));
    }

    container.close();
}

#[test]
fn should_disambiguate_providers_by_qualifier() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_fortune_file(&directory);

    let mut container = BeanContainer::new();
    register_coaching_beans(&mut container, &path).unwrap();

    let file_provider = container
        .bean_with_qualifier::<dyn FortuneService + Send + Sync>(FILE_QUALIFIER)
        .unwrap();
    let fixed_provider = container
        .bean_with_qualifier::<dyn FortuneService + Send + Sync>(FIXED_QUALIFIER)
        .unwrap();

    assert!(FILE_FORTUNES.contains(&file_provider.fortune().as_str()));
    assert!(FIXED_FORTUNES.contains(&fixed_provider.fortune().as_str()));

    // two providers satisfy the capability, so an unqualified request fails
    assert!(matches!(
        container
            .bean::<dyn FortuneService + Send + Sync>()
            .unwrap_err(),
        BeanResolutionError::AmbiguousResolution { .. }
    ));
}

#[test]
fn should_reuse_the_singleton_coach() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_fortune_file(&directory);

    let mut container = BeanContainer::new();
    register_coaching_beans(&mut container, &path).unwrap();

    let first = container.bean::<dyn Coach + Send + Sync>().unwrap();
    let second = container.bean::<dyn Coach + Send + Sync>().unwrap();

    assert!(BeanPtr::ptr_eq(&first, &second));
}

#[test]
fn should_create_fresh_prototype_coaches() {
    let mut container = BeanContainer::new();
    register_prototype_coach(&mut container).unwrap();

    let first = container.bean_by_name::<dyn Coach + Send + Sync>("prototype_coach").unwrap();
    let second = container.bean_by_name::<dyn Coach + Send + Sync>("prototype_coach").unwrap();

    assert!(!BeanPtr::ptr_eq(&first, &second));

    container.close();

    // prototypes outlive the container
    assert!(FIXED_FORTUNES.contains(&first.daily_fortune().as_str()));
}

#[test]
fn should_retry_coach_construction_once_the_file_appears() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("fortune-data.txt");

    let mut container = BeanContainer::new();
    register_coaching_beans(&mut container, &path).unwrap();

    // the provider construction fails while the file is missing...
    assert!(matches!(
        container.bean::<dyn Coach + Send + Sync>().unwrap_err(),
        BeanResolutionError::BeanConstruction { name, .. } if name == "file_fortune_service"
    ));

    // ...and succeeds on a later request once it becomes available
    fs::write(&path, FILE_FORTUNES.join("\n")).unwrap();

    let coach = container.bean::<dyn Coach + Send + Sync>().unwrap();
    assert!(FILE_FORTUNES.contains(&coach.daily_fortune().as_str()));
}
