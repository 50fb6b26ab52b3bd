use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use retrofx_core::prelude::*;

/// Stand-in for an external service the component subscribes to.
#[derive(Default)]
struct Bus {
    connected: bool,
    channels: BTreeSet<String>,
}

type SharedBus = Rc<RefCell<Bus>>;

#[derive(Clone)]
struct TickerProps {
    channel: String,
    label: String,
}

struct Ticker {
    props: TickerProps,
    bus: SharedBus,
}

impl EffectComponent for Ticker {
    type Props = TickerProps;
    type Context = SharedBus;
    type Output = String;
    type Snapshot = ();
    type Error = anyhow::Error;

    fn construct(props: TickerProps, bus: &SharedBus, fx: &Effects) -> anyhow::Result<Self> {
        let conn = bus.clone();
        fx.declare_effect(
            move || {
                conn.borrow_mut().connected = true;
                log::info!("bus connected");
                let conn = conn.clone();
                on_unmount(move || {
                    conn.borrow_mut().connected = false;
                    log::info!("bus disconnected");
                })
            },
            Deps::from_fn(|| Dep::list(["bus"])),
        )?;

        Ok(Ticker {
            props,
            bus: bus.clone(),
        })
    }

    fn render(&mut self, fx: &Effects) -> anyhow::Result<String> {
        let bus = self.bus.clone();
        let channel = self.props.channel.clone();
        fx.declare_effect(
            move || {
                bus.borrow_mut().channels.insert(channel.clone());
                log::info!("subscribed to {channel}");
                let bus = bus.clone();
                let channel = channel.clone();
                on_unmount(move || {
                    bus.borrow_mut().channels.remove(&channel);
                    log::info!("unsubscribed from {channel}");
                })
            },
            deps![self.props.channel.clone()],
        )?;

        let label = self.props.label.clone();
        fx.declare_effect(
            move || {
                log::info!("title set to {label:?}");
                None
            },
            Deps::Absent,
        )?;

        Ok(format!("[{}] {}", self.props.channel, self.props.label))
    }

    fn props(&self) -> &TickerProps {
        &self.props
    }

    fn receive_props(&mut self, props: TickerProps) -> TickerProps {
        std::mem::replace(&mut self.props, props)
    }
}

fn props(channel: &str, label: &str) -> TickerProps {
    TickerProps {
        channel: channel.into(),
        label: label.into(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let bus = SharedBus::default();
    log::info!("mounting {}", WithEffects::<Ticker>::display_name());

    let mut root = Root::<WithEffects<Ticker>>::mount(props("btc", "Bitcoin"), &bus)?;
    println!("{}", root.output().map(String::as_str).unwrap_or_default());

    // Same channel: only the title effect re-runs.
    root.update(props("btc", "Bitcoin (BTC)"))?;
    println!("{}", root.output().map(String::as_str).unwrap_or_default());

    // New channel: unsubscribe from btc, subscribe to eth.
    root.update(props("eth", "Ether"))?;
    println!("{}", root.output().map(String::as_str).unwrap_or_default());
    log::info!("channels: {:?}", bus.borrow().channels);

    root.unmount();
    let bus = bus.borrow();
    anyhow::ensure!(!bus.connected, "bus still connected after unmount");
    anyhow::ensure!(bus.channels.is_empty(), "dangling subscriptions: {:?}", bus.channels);
    Ok(())
}
