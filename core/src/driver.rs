//! Native tokio driver
//!
//! Runs a sequencer inside a single task: commands arrive over a channel, the
//! task sleeps until the next timer deadline, and every state change is
//! published on a watch channel. Time is `tokio::time`, so tests can pause it.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};

use birthday_types::{Millis, SoundId, Viewport};

use crate::audio::{AudioPlayer, PlaybackId};
use crate::confetti::ParticleEffect;
use crate::sequencer::{Sequencer, SequencerState};

/// Inputs from the host
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Celebrate,
    SelectSound(SoundId),
    PlaybackFinished(PlaybackId),
    Resize(Viewport),
    Shutdown,
}

/// Sender half for [`Command`]s
pub type CommandSender = mpsc::UnboundedSender<Command>;

/// Run until `Shutdown` or until every command sender is dropped.
///
/// Returns the disposed sequencer.
pub async fn run<A, P>(
    mut sequencer: Sequencer<A, P>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    states: watch::Sender<SequencerState>,
) -> Sequencer<A, P>
where
    A: AudioPlayer,
    P: ParticleEffect,
{
    let origin = Instant::now();
    let elapsed = || origin.elapsed().as_millis() as Millis;

    tracing::debug!("Sequencer driver started");

    loop {
        let deadline = sequencer.next_deadline();

        tokio::select! {
            command = commands.recv() => {
                match command {
                    Some(Command::Celebrate) => sequencer.start_celebration(elapsed()),
                    Some(Command::SelectSound(sound)) => sequencer.select_sound(sound),
                    Some(Command::PlaybackFinished(playback)) => {
                        sequencer.on_playback_finished(playback)
                    }
                    Some(Command::Resize(viewport)) => sequencer.resize(viewport),
                    Some(Command::Shutdown) | None => break,
                }
            }
            _ = sleep_until(origin + Duration::from_millis(deadline.unwrap_or_default())),
                if deadline.is_some() =>
            {
                sequencer.advance_to(elapsed());
            }
        }

        states.send_if_modified(|current| {
            if *current != *sequencer.state() {
                *current = sequencer.state().clone();
                true
            } else {
                false
            }
        });
    }

    sequencer.dispose();
    tracing::debug!("Sequencer driver stopped");
    sequencer
}

/// Spawn [`run`] on the current runtime.
///
/// Returns the command sender, a state receiver and the task handle.
pub fn spawn<A, P>(
    sequencer: Sequencer<A, P>,
) -> (
    CommandSender,
    watch::Receiver<SequencerState>,
    tokio::task::JoinHandle<Sequencer<A, P>>,
)
where
    A: AudioPlayer + Send + 'static,
    P: ParticleEffect + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(sequencer.state().clone());
    let handle = tokio::spawn(run(sequencer, command_rx, state_tx));
    (command_tx, state_rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioEvent, create_audio_channel};
    use crate::confetti::ConfettiField;
    use crate::sequencer::{Phase, RevealTiming};

    fn make_sequencer() -> (
        Sequencer<crate::audio::ChannelAudio, ConfettiField>,
        mpsc::UnboundedReceiver<AudioEvent>,
    ) {
        let (audio, audio_rx) = create_audio_channel();
        let particles = ConfettiField::new(vec![[255, 0, 0, 255]], 42);
        let sequencer = Sequencer::new(
            RevealTiming::default(),
            SoundId::BirthdaySong,
            audio,
            particles,
        );
        (sequencer, audio_rx)
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_runs_reference_timeline() {
        let (sequencer, _audio_rx) = make_sequencer();
        let (commands, states, handle) = spawn(sequencer);

        commands.send(Command::Celebrate).unwrap();

        sleep_ms(1250).await;
        assert_eq!(states.borrow().candles_lit, 2);

        sleep_ms(1350).await; // t = 2600
        assert_eq!(states.borrow().candles_lit, 5);
        assert_eq!(states.borrow().balloons_popped, 0);

        sleep_ms(2500).await; // t = 5100
        assert_eq!(states.borrow().balloons_popped, 5);
        assert_eq!(states.borrow().phase, Phase::Done);

        commands.send(Command::Shutdown).unwrap();
        let sequencer = handle.await.unwrap();
        assert!(sequencer.is_disposed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_forwards_audio_and_completion() {
        let (sequencer, mut audio_rx) = make_sequencer();
        let (commands, states, handle) = spawn(sequencer);

        commands
            .send(Command::Resize(Viewport::new(640.0, 480.0)))
            .unwrap();
        commands.send(Command::Celebrate).unwrap();
        sleep_ms(100).await;

        assert_eq!(audio_rx.recv().await, Some(AudioEvent::Stop));
        let Some(AudioEvent::Play { playback, sound }) = audio_rx.recv().await else {
            panic!("expected a play request");
        };
        assert_eq!(sound, SoundId::BirthdaySong);
        assert!(states.borrow().confetti_active);

        commands.send(Command::PlaybackFinished(playback)).unwrap();
        sleep_ms(100).await;
        assert!(!states.borrow().confetti_active);
        assert!(states.borrow().celebrating);

        drop(commands);
        let sequencer = handle.await.unwrap();
        assert!(sequencer.is_disposed());
        assert!(!sequencer.particles().is_active());
        assert_eq!(sequencer.particles().viewport(), Viewport::new(640.0, 480.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_mid_sequence_stops_reveal() {
        let (sequencer, _audio_rx) = make_sequencer();
        let (commands, states, handle) = spawn(sequencer);

        commands.send(Command::Celebrate).unwrap();
        sleep_ms(1200).await;
        commands.send(Command::Shutdown).unwrap();

        let sequencer = handle.await.unwrap();
        sleep_ms(5000).await;

        assert_eq!(sequencer.state().candles_lit, 2);
        assert_eq!(states.borrow().candles_lit, 2);
        assert_eq!(sequencer.next_deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_sound_command() {
        let (sequencer, _audio_rx) = make_sequencer();
        let (commands, states, handle) = spawn(sequencer);

        commands.send(Command::Celebrate).unwrap();
        sleep_ms(1600).await;
        commands
            .send(Command::SelectSound(SoundId::BirthdayWish))
            .unwrap();
        sleep_ms(10).await;

        {
            let state = states.borrow();
            assert_eq!(state.selected_sound, SoundId::BirthdayWish);
            assert!(!state.confetti_active);
            assert_eq!(state.candles_lit, 3);
        }

        commands.send(Command::Shutdown).unwrap();
        handle.await.unwrap();
    }
}
