pub mod journal_view;
