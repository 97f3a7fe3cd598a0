use std::sync::Arc;

use dom_quiz::chat::{self, Interaction, FINISH, NEXT};
use dom_quiz::config::Config;
use dom_quiz::quiz::{Action, QuestionBank, QuizSession, Surface};
use dom_quiz::store::{self, Identity, MemoryStore, Results, StateStore, Tier};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveName {
        store: MemoryStore,
    },
    ReceiveGroup {
        store: MemoryStore,
        name: String,
    },
    ReceiveTier {
        store: MemoryStore,
    },
    Quiz {
        store: MemoryStore,
        session: QuizSession,
        surface: Surface,
    },
}

type QuizStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    let config = Config::load();

    pretty_env_logger::init();
    log::info!("Starting quiz bot...");

    let bank = Arc::new(QuestionBank::builtin().expect("Failed to load the question bank"));

    let bot = Bot::from_env();

    log::info!("Opening dialogue storage at {}", config.db_path);
    let storage: QuizStorage = SqliteStorage::open(&config.db_path, Json)
        .await
        .expect("Failed to open the dialogue storage")
        .erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveName { store }].endpoint(receive_name))
            .branch(dptree::case![State::ReceiveGroup { store, name }].endpoint(receive_group))
            .branch(dptree::case![State::ReceiveTier { store }].endpoint(receive_tier))
            .branch(
                dptree::case![State::Quiz {
                    store,
                    session,
                    surface
                }]
                .endpoint(quiz),
            ),
    )
    .dependencies(dptree::deps![storage, bank])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str = "Привіт! Це тест на знання DOM: методи, елементи та атрибути. Давай познайомимося! Як тебе звати (ПІБ)?";

fn keyboard(rows: Vec<Vec<String>>) -> KeyboardMarkup {
    KeyboardMarkup::new(
        rows.into_iter()
            .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
    )
}

fn tier_keyboard() -> KeyboardMarkup {
    keyboard(
        Tier::ALL
            .iter()
            .map(|tier| vec![tier.title().to_string()])
            .collect(),
    )
}

async fn send_screen(bot: &Bot, chat_id: ChatId, screen: chat::Screen) -> HandlerResult {
    bot.send_message(chat_id, screen.text)
        .reply_markup(keyboard(screen.keyboard))
        .await?;
    Ok(())
}

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;

    dialogue
        .update(State::ReceiveName {
            store: MemoryStore::new(),
        })
        .await?;
    Ok(())
}

async fn receive_name(
    bot: Bot,
    dialogue: QuizDialogue,
    store: MemoryStore,
    msg: Message,
) -> HandlerResult {
    let name = msg.text().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        bot.send_message(msg.chat.id, "Будь ласка, введіть своє ім'я (текстом)")
            .await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, format!("Приємно познайомитися, {}! З якої ти групи?", name))
        .await?;

    dialogue
        .update(State::ReceiveGroup {
            store,
            name: name.to_string(),
        })
        .await?;
    Ok(())
}

async fn receive_group(
    bot: Bot,
    dialogue: QuizDialogue,
    (mut store, name): (MemoryStore, String),
    msg: Message,
) -> HandlerResult {
    let Some(identity) = Identity::capture(&name, msg.text().unwrap_or_default()) else {
        bot.send_message(msg.chat.id, "Будь ласка, введіть назву групи (текстом)")
            .await?;
        return Ok(());
    };
    identity.save(&mut store);
    debug!("Saved identity {:?}", identity);

    bot.send_message(msg.chat.id, "Дані збережено. Обери рівень складності:")
        .reply_markup(tier_keyboard())
        .await?;

    dialogue.update(State::ReceiveTier { store }).await?;
    Ok(())
}

async fn receive_tier(
    bank: Arc<QuestionBank>,
    bot: Bot,
    dialogue: QuizDialogue,
    mut store: MemoryStore,
    msg: Message,
) -> HandlerResult {
    if !store::can_choose_tier(&store) {
        bot.send_message(msg.chat.id, GREETING_TEXT).await?;
        dialogue.update(State::ReceiveName { store }).await?;
        return Ok(());
    }

    let Some(tier) = msg.text().and_then(Tier::parse) else {
        bot.send_message(msg.chat.id, "Будь ласка, виберіть один з варіантів")
            .reply_markup(tier_keyboard())
            .await?;
        return Ok(());
    };
    tier.save(&mut store);

    let level = store.get(store::TEST_LEVEL).unwrap_or_default();
    let mut surface = Surface::new();
    let session = {
        let mut rng = StdRng::from_entropy();
        QuizSession::start(&bank, &level, &mut surface, &mut rng)
    };

    let screen = chat::present(&surface, &store::quiz_header(&store), session.affordance());
    send_screen(&bot, msg.chat.id, screen).await?;

    dialogue
        .update(State::Quiz {
            store,
            session,
            surface,
        })
        .await?;
    Ok(())
}

async fn quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    (mut store, mut session, mut surface): (MemoryStore, QuizSession, Surface),
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Будь ласка, відповідайте текстом")
            .await?;
        return Ok(());
    };

    match (text, session.affordance()) {
        (NEXT, Some(Action::Advance)) => {
            let mut rng = StdRng::from_entropy();
            session.advance(&mut surface, &mut rng)?;
        }
        (FINISH, Some(Action::Finish)) => {
            session.finish(&surface, &mut store)?;

            bot.send_message(msg.chat.id, Results::load(&store).to_string())
                .await?;
            bot.send_message(msg.chat.id, "Хочеш пройти ще раз? Обери рівень складності:")
                .reply_markup(tier_keyboard())
                .await?;

            dialogue.update(State::ReceiveTier { store }).await?;
            return Ok(());
        }
        (NEXT, _) | (FINISH, _) => {
            bot.send_message(msg.chat.id, "Ця дія зараз недоступна").await?;
        }
        _ => {
            if chat::interact(&mut surface, text) == Interaction::Ignored {
                bot.send_message(msg.chat.id, "Не вдалося застосувати відповідь, скористайтеся кнопками")
                    .await?;
            }
        }
    }

    let screen = chat::present(&surface, &store::quiz_header(&store), session.affordance());
    send_screen(&bot, msg.chat.id, screen).await?;

    dialogue
        .update(State::Quiz {
            store,
            session,
            surface,
        })
        .await?;
    Ok(())
}
