pub mod wizard_presenter;
