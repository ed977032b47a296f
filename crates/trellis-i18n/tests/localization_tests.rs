//! Localization bootstrap and fallback tests

use rstest::{fixture, rstest};
use trellis_i18n::{I18nError, Localization, LocalizationSettings, MessageCatalog, Translate};

#[fixture]
fn i18n() -> Localization {
	let mut i18n = Localization::bundled().unwrap();
	i18n.add_resources(
		"da-DK",
		r#"{"translation": {"default": {"saveTitle": "Gem"}, "greeting": "Hej {{name}}"}}"#,
	)
	.unwrap();
	i18n
}

#[rstest]
#[case("default.saveTitle", "Save")]
#[case("default.cancelTitle", "Cancel")]
#[case("default.reset", "Reset")]
#[case("default.apply", "Apply")]
#[case("settingsUsers.editUserRole", "Edit user role")]
#[case("home.navigationTitle", "Home")]
fn test_bundled_messages(#[case] key: &str, #[case] expected: &str) {
	let i18n = Localization::bundled().unwrap();

	assert_eq!(i18n.t(key), expected);
}

#[rstest]
fn test_missing_key_returns_key(i18n: Localization) {
	assert_eq!(i18n.t("settingsUsers.nope"), "settingsUsers.nope");
}

#[rstest]
fn test_active_language_then_fallback(mut i18n: Localization) {
	i18n.change_language("da-DK").unwrap();

	assert_eq!(i18n.language(), "da-DK");
	assert_eq!(i18n.t("default.saveTitle"), "Gem");
	// Not translated in da-DK, falls back to en-EN
	assert_eq!(i18n.t("default.cancelTitle"), "Cancel");
}

#[rstest]
fn test_unknown_locale_keeps_language(mut i18n: Localization) {
	let err = i18n.change_language("fr-FR").unwrap_err();

	assert!(matches!(err, I18nError::UnknownLocale(ref l) if l == "fr-FR"));
	assert_eq!(i18n.language(), "en-EN");
}

#[rstest]
fn test_t_with_interpolates(mut i18n: Localization) {
	i18n.change_language("da-DK").unwrap();

	assert_eq!(i18n.t_with("greeting", &[("name", "Ann")]), "Hej Ann");
}

#[rstest]
fn test_initial_language_without_catalog_falls_back() {
	let settings = LocalizationSettings {
		initial_lang: "sv-SE".to_string(),
		..LocalizationSettings::default()
	};
	let i18n = Localization::with_bundled(settings).unwrap();

	assert_eq!(i18n.language(), "sv-SE");
	assert_eq!(i18n.t("default.editTitle"), "Edit");
}

#[rstest]
fn test_later_resources_extend_catalog(mut i18n: Localization) {
	i18n.add_catalog({
		let mut extra = MessageCatalog::new("en-EN", "translation");
		extra.add("default.saveTitle", "Store");
		extra
	});

	assert_eq!(i18n.t("default.saveTitle"), "Store");
	assert_eq!(i18n.t("default.cancelTitle"), "Cancel");
	assert_eq!(i18n.languages(), vec!["da-DK", "en-EN"]);
}

#[rstest]
fn test_translate_through_reference(i18n: Localization) {
	fn label<T: Translate>(translator: T) -> String {
		translator.t("default.moreTitle")
	}

	assert_eq!(label(&i18n), "More");
}
