use std::sync::Arc;

use teloxide::{types::ChatId, Bot};

use crate::interactor::deal_interactor::{DealInteractor, DealInteractorImpl};
use crate::interactor::pair_interactor::{PairInteractor, PairInteractorImpl};
use crate::interactor::repository::JournalRepository;
use crate::interactor::user_interactor::{UserInteractor, UserInteractorImpl};
use crate::presenter::wizard_presenter::{WizardOptions, WizardPresenterImpl};
use crate::session::{InMemSessionStore, UserLocks};
use crate::view::journal_view::TelegramJournalView;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Conversation state
    sessions: Arc<InMemSessionStore>,
    locks: Arc<UserLocks>,

    // Interactors
    user_interactor: Arc<dyn UserInteractor>,
    pair_interactor: Arc<dyn PairInteractor>,
    deal_interactor: Arc<dyn DealInteractor>,

    wizard_options: WizardOptions,
}

impl ServiceContainer {
    pub fn new(
        repository: Arc<dyn JournalRepository>,
        sessions: Arc<InMemSessionStore>,
        wizard_options: WizardOptions,
    ) -> Self {
        let user_interactor =
            Arc::new(UserInteractorImpl::new(repository.clone())) as Arc<dyn UserInteractor>;
        let pair_interactor =
            Arc::new(PairInteractorImpl::new(repository.clone())) as Arc<dyn PairInteractor>;
        let deal_interactor =
            Arc::new(DealInteractorImpl::new(repository.clone())) as Arc<dyn DealInteractor>;

        Self {
            sessions,
            locks: Arc::new(UserLocks::new()),
            user_interactor,
            pair_interactor,
            deal_interactor,
            wizard_options,
        }
    }

    // Accessor methods

    pub fn locks(&self) -> Arc<UserLocks> {
        self.locks.clone()
    }

    pub fn user_interactor(&self) -> Arc<dyn UserInteractor> {
        self.user_interactor.clone()
    }

    /// Wizard bound to one chat
    pub fn wizard_presenter(
        &self,
        bot: Bot,
        chat_id: ChatId,
    ) -> WizardPresenterImpl<TelegramJournalView> {
        WizardPresenterImpl::new(
            self.pair_interactor.clone(),
            self.deal_interactor.clone(),
            self.sessions.clone(),
            self.locks.clone(),
            Arc::new(TelegramJournalView::new(bot, chat_id)),
            self.wizard_options,
        )
    }
}
