use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex_cards::action::Action;
use pokedex_cards::api::{CatalogSource, PokeClient};
use pokedex_cards::config::CatalogArgs;
use pokedex_cards::effect::Effect;
use pokedex_cards::reducer::reducer;
use pokedex_cards::sprite_backend::{self, SpriteBackend};
use pokedex_cards::state::{AppState, SpriteTarget};
use pokedex_cards::ui::{CatalogComponentId, CatalogContext, CatalogUi};
use pokedex_cards::{logging, resolver};

#[derive(Parser, Debug)]
#[command(name = "pokedex-cards")]
#[command(about = "Browse the PokeAPI catalog as a grid of cards")]
struct Args {
    #[command(flatten)]
    debug: DebugCliArgs,

    #[command(flatten)]
    catalog: CatalogArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = args
        .catalog
        .resolve()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    logging::init(&config)?;
    tracing::info!(
        api_base = %config.api_base,
        page_size = config.page_size,
        "starting pokedex-cards"
    );

    let debug = DebugSession::new(args.debug);
    let page_size = config.page_size;
    let state = debug
        .load_state_or_else_async(|| async move {
            let mut state = AppState::with_page_size(page_size);
            if let Ok(size) = crossterm::terminal::size() {
                state.terminal_size = size;
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let client: Arc<dyn CatalogSource> =
        Arc::new(PokeClient::new(&config.api_base, &config.sprite_base));

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = SpriteBackend::new(stdout, sprite_backend::sprite_registry());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, client).await;

    if use_alt_screen {
        // one empty frame so the backend deletes any images still on screen
        sprite_backend::clear_sprites();
        terminal.draw(|_| {})?;
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = match result {
        Ok(output) => output,
        Err(err) => {
            tracing::error!(%err, "run loop failed");
            return Err(err);
        }
    };
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("bye");
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    client: Arc<dyn CatalogSource>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CatalogUi::new()));
    let mut bus: EventBus<AppState, Action, CatalogComponentId, CatalogContext> = EventBus::new();
    let keybindings: Keybindings<CatalogContext> = Keybindings::new();

    let ui_grid = Rc::clone(&ui);
    bus.register(CatalogComponentId::Grid, move |event, state| {
        ui_grid.borrow_mut().handle_grid_event(&event.kind, state)
    });

    let ui_modal = Rc::clone(&ui);
    bus.register(CatalogComponentId::Modal, move |event, state| {
        ui_modal.borrow_mut().handle_modal_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(90), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &Arc<dyn CatalogSource>) {
    match effect {
        Effect::LoadList { limit } => {
            let client = Arc::clone(client);
            ctx.tasks().spawn(TaskKey::new("list"), async move {
                match client.fetch_summaries(limit).await {
                    Ok(summaries) => {
                        tracing::info!(count = summaries.len(), "catalog loaded");
                        Action::ListDidLoad(summaries)
                    }
                    Err(err) => {
                        tracing::error!(%err, "catalog load failed");
                        Action::ListDidError(err.to_string())
                    }
                }
            });
        }
        Effect::ResolveEntity {
            summary,
            generation,
        } => {
            let client = Arc::clone(client);
            // a newer selection replaces the task under the same key
            ctx.tasks().spawn(TaskKey::new("resolve"), async move {
                match resolver::resolve(client.as_ref(), &summary).await {
                    Ok(resolution) => Action::ResolveDidLoad {
                        generation,
                        detail: resolution.detail,
                        stages: resolution.stages,
                    },
                    Err(err) => {
                        tracing::warn!(name = %summary.name, %err, "detail resolution failed");
                        Action::ResolveDidError {
                            generation,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
        Effect::LoadSprite { target, url } => {
            let key = match target {
                SpriteTarget::Preview => "preview_sprite".to_string(),
                SpriteTarget::Modal { .. } => format!("sprite_{url}"),
            };
            let client = Arc::clone(client);
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match client.fetch_sprite(&url).await {
                    Ok(sprite) => Action::SpriteDidLoad {
                        target,
                        url,
                        sprite,
                    },
                    Err(err) => {
                        tracing::warn!(%url, %err, "sprite load failed");
                        Action::SpriteDidError {
                            target,
                            url,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
    }
}
