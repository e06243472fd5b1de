pub mod callback;
pub mod message;

use crate::config::Config;
use crate::database::store::RegistrationStore;
use std::sync::Arc;
use teloxide::{
    dispatching::{dialogue, UpdateHandler},
    prelude::*,
};

pub struct BotHandler {
    pub store: RegistrationStore,
    pub config: Arc<Config>,
}

impl BotHandler {
    pub fn new(store: RegistrationStore, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    pub fn schema(&self) -> UpdateHandler<teloxide::RequestError> {
        use teloxide::dispatching::UpdateFilterExt;

        let store = self.store.clone();
        let config = self.config.clone();
        let store_callback = self.store.clone();

        dialogue::enter::<Update, teloxide::dispatching::dialogue::InMemStorage<()>, (), _>()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, msg, cmd| {
                        let store = store.clone();
                        let config = config.clone();
                        async move { message::command_handler(bot, msg, cmd, store, config).await }
                    }),
            )
            .branch(Update::filter_callback_query().endpoint(move |bot, q| {
                let store = store_callback.clone();
                async move { callback::callback_handler(bot, q, store).await }
            }))
    }
}
