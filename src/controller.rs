use std::time::Duration;

use crate::error::{CarouselError, Result};
use crate::observer::{ObserverList, Subscription};
use crate::state::ControllerState;

/// Auto-advancing slideshow.
///
/// Owns an immutable set of slides and the active index. Time is fed in by
/// the host loop through [`SlideshowController::update`]; every full
/// `period` of accumulated time advances the active slide by one while the
/// controller is running. Manual navigation re-arms the timer, pausing
/// discards the elapsed part of the current period.
#[derive(Debug)]
pub struct SlideshowController<S> {
    slides: Vec<S>,
    period: Duration,
    active_index: usize,
    started: bool,
    paused: bool,
    disposed: bool,
    elapsed: Duration,
    observers: ObserverList,
}

impl<S> SlideshowController<S> {
    pub fn create(slides: Vec<S>, period: Duration) -> Result<Self> {
        if slides.is_empty() {
            return Err(CarouselError::invalid("slide set must not be empty"));
        }
        if period.is_zero() {
            return Err(CarouselError::invalid("period must be greater than zero"));
        }

        Ok(Self {
            slides,
            period,
            active_index: 0,
            started: false,
            paused: false,
            disposed: false,
            elapsed: Duration::ZERO,
            observers: ObserverList::new(),
        })
    }

    pub fn state(&self) -> ControllerState {
        if self.disposed {
            ControllerState::Disposed
        } else if !self.started {
            ControllerState::Stopped
        } else if self.paused {
            ControllerState::Paused
        } else {
            ControllerState::Running
        }
    }

    /// Arms the periodic timer. Calling it on a running controller keeps the
    /// current phase. A controller paused before `start` stays paused until
    /// `resume`.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_live("start")?;
        if !self.started {
            self.started = true;
            self.elapsed = Duration::ZERO;
            tracing::info!(slides = self.slides.len(), period_ms = self.period.as_millis() as u64, "slideshow started");
        }
        Ok(())
    }

    /// Cancels the timer and detaches every observer. Terminal.
    pub fn dispose(&mut self) -> Result<()> {
        self.ensure_live("dispose")?;
        self.disposed = true;
        self.started = false;
        self.elapsed = Duration::ZERO;
        self.observers.clear();
        tracing::info!("slideshow disposed");
        Ok(())
    }

    pub fn next(&mut self) -> Result<()> {
        self.ensure_live("next")?;
        let index = (self.active_index + 1) % self.slides.len();
        self.navigate(index);
        Ok(())
    }

    pub fn previous(&mut self) -> Result<()> {
        self.ensure_live("previous")?;
        let len = self.slides.len() as isize;
        let index = (self.active_index as isize - 1).rem_euclid(len) as usize;
        self.navigate(index);
        Ok(())
    }

    pub fn go_to(&mut self, index: usize) -> Result<()> {
        self.ensure_live("go_to")?;
        self.check_index(index)?;
        self.navigate(index);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.ensure_live("pause")?;
        if !self.paused {
            self.paused = true;
            self.elapsed = Duration::ZERO;
            tracing::debug!(index = self.active_index, "slideshow paused");
        }
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.ensure_live("resume")?;
        if self.paused {
            self.paused = false;
            self.elapsed = Duration::ZERO;
            tracing::debug!(index = self.active_index, "slideshow resumed");
        }
        Ok(())
    }

    /// Registers `observer`, called with the new active index after every
    /// change, whatever caused it.
    pub fn on_change<F>(&mut self, observer: F) -> Result<Subscription>
    where
        F: FnMut(usize) + 'static,
    {
        self.ensure_live("on_change")?;
        Ok(self.observers.subscribe(observer))
    }

    /// Feeds `dt` of elapsed time into the timer, firing one tick per full
    /// period. Does nothing unless the controller is running.
    pub fn update(&mut self, dt: Duration) {
        if self.state() != ControllerState::Running {
            return;
        }

        self.elapsed += dt;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            let index = (self.active_index + 1) % self.slides.len();
            tracing::debug!(from = self.active_index, to = index, "slideshow tick");
            self.set_active(index);
        }
    }

    pub fn current_index(&self) -> usize {
        self.active_index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left before the next tick, or `None` when no tick is pending.
    pub fn time_to_next_tick(&self) -> Option<Duration> {
        (self.state() == ControllerState::Running).then(|| self.period - self.elapsed)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[S] {
        &self.slides
    }

    pub fn active_slide(&self) -> &S {
        &self.slides[self.active_index]
    }

    pub fn slide(&self, index: usize) -> Result<&S> {
        self.slides.get(index).ok_or(CarouselError::OutOfRange {
            index,
            len: self.slides.len(),
        })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.slides.len() {
            Ok(())
        } else {
            Err(CarouselError::OutOfRange {
                index,
                len: self.slides.len(),
            })
        }
    }

    fn ensure_live(&self, operation: &str) -> Result<()> {
        if self.state().is_terminal() {
            tracing::warn!(operation, "slideshow used after dispose");
            return Err(CarouselError::Disposed);
        }
        Ok(())
    }

    // Manual navigation: re-arm so the next tick is a full period away
    fn navigate(&mut self, index: usize) {
        self.elapsed = Duration::ZERO;
        self.set_active(index);
    }

    fn set_active(&mut self, index: usize) {
        if index == self.active_index {
            return;
        }
        self.active_index = index;
        self.observers.notify(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const PERIOD: Duration = Duration::from_millis(1000);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn controller(len: usize) -> SlideshowController<usize> {
        SlideshowController::create((0..len).collect(), PERIOD).unwrap()
    }

    fn recorded(controller: &mut SlideshowController<usize>) -> Rc<RefCell<Vec<usize>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        controller.on_change(move |index| sink.borrow_mut().push(index)).unwrap();
        seen
    }

    #[test]
    fn create_starts_at_first_slide() {
        for len in 1..6 {
            let controller = controller(len);
            assert_eq!(controller.current_index(), 0);
            assert_eq!(controller.state(), ControllerState::Stopped);
        }
    }

    #[test]
    fn create_rejects_empty_slides_and_zero_period() {
        let empty = SlideshowController::<u8>::create(Vec::new(), PERIOD);
        assert!(matches!(empty, Err(CarouselError::InvalidArgument(_))));

        let zero = SlideshowController::create(vec![1, 2], Duration::ZERO);
        assert!(matches!(zero, Err(CarouselError::InvalidArgument(_))));
    }

    #[test]
    fn go_to_sets_index_and_rejects_out_of_range() {
        let mut controller = controller(4);
        for index in 0..4 {
            controller.go_to(index).unwrap();
            assert_eq!(controller.current_index(), index);
        }

        assert_eq!(
            controller.go_to(4),
            Err(CarouselError::OutOfRange { index: 4, len: 4 })
        );
        assert_eq!(
            controller.go_to(usize::MAX),
            Err(CarouselError::OutOfRange { index: usize::MAX, len: 4 })
        );
        assert_eq!(controller.current_index(), 3);
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut controller = controller(4);
        controller.previous().unwrap();
        assert_eq!(controller.current_index(), 3);
        controller.next().unwrap();
        assert_eq!(controller.current_index(), 0);

        for _ in 0..3 {
            controller.next().unwrap();
        }
        assert_eq!(controller.current_index(), 3);
        controller.next().unwrap();
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn single_slide_never_notifies() {
        let mut controller = controller(1);
        let seen = recorded(&mut controller);
        controller.start().unwrap();
        controller.next().unwrap();
        controller.previous().unwrap();
        controller.update(ms(5000));

        assert_eq!(controller.current_index(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn update_before_start_does_nothing() {
        let mut controller = controller(3);
        controller.update(ms(10_000));
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.time_to_next_tick(), None);
    }

    #[test]
    fn ticks_once_per_full_period() {
        let mut controller = controller(3);
        controller.start().unwrap();

        controller.update(ms(999));
        assert_eq!(controller.current_index(), 0);
        controller.update(ms(1));
        assert_eq!(controller.current_index(), 1);
        assert_eq!(controller.time_to_next_tick(), Some(PERIOD));
    }

    #[test]
    fn start_is_idempotent_and_keeps_phase() {
        let mut controller = controller(3);
        controller.start().unwrap();
        controller.update(ms(600));
        controller.start().unwrap();
        controller.update(ms(400));
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn pause_suspends_ticks_and_resume_starts_a_fresh_period() {
        let mut controller = controller(3);
        controller.start().unwrap();
        controller.update(ms(700));
        controller.pause().unwrap();
        assert_eq!(controller.state(), ControllerState::Paused);

        controller.update(ms(2 * 1000 + 500));
        assert_eq!(controller.current_index(), 0);

        controller.resume().unwrap();
        assert_eq!(controller.state(), ControllerState::Running);
        controller.update(ms(999));
        assert_eq!(controller.current_index(), 0);
        controller.update(ms(1));
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut controller = controller(3);
        controller.start().unwrap();
        controller.pause().unwrap();
        controller.pause().unwrap();
        assert!(controller.is_paused());

        controller.resume().unwrap();
        controller.update(ms(500));
        // A second resume must not re-arm the running period
        controller.resume().unwrap();
        controller.update(ms(500));
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn paused_before_start_stays_paused_until_resumed() {
        let mut controller = controller(3);
        controller.pause().unwrap();
        controller.start().unwrap();
        assert_eq!(controller.state(), ControllerState::Paused);

        controller.update(ms(3000));
        assert_eq!(controller.current_index(), 0);

        controller.resume().unwrap();
        controller.update(ms(1000));
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn manual_navigation_rearms_the_timer() {
        let mut controller = controller(4);
        controller.start().unwrap();
        controller.update(ms(900));

        controller.next().unwrap();
        controller.update(ms(999));
        assert_eq!(controller.current_index(), 1);
        controller.update(ms(1));
        assert_eq!(controller.current_index(), 2);

        controller.update(ms(900));
        controller.previous().unwrap();
        controller.update(ms(999));
        assert_eq!(controller.current_index(), 1);

        controller.update(ms(1));
        controller.update(ms(900));
        controller.go_to(0).unwrap();
        controller.update(ms(999));
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn go_to_current_index_rearms_without_notifying() {
        let mut controller = controller(3);
        let seen = recorded(&mut controller);
        controller.start().unwrap();
        controller.update(ms(900));
        controller.go_to(0).unwrap();
        controller.update(ms(900));

        assert_eq!(controller.current_index(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn observers_see_every_change_in_order() {
        let mut controller = controller(4);
        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second"] {
            let sink = order.clone();
            controller
                .on_change(move |index| sink.borrow_mut().push((name, index)))
                .unwrap();
        }

        controller.start().unwrap();
        controller.next().unwrap();
        controller.go_to(3).unwrap();
        controller.update(ms(1000));

        assert_eq!(
            *order.borrow(),
            vec![
                ("first", 1),
                ("second", 1),
                ("first", 3),
                ("second", 3),
                ("first", 0),
                ("second", 0),
            ]
        );
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let mut controller = controller(3);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = controller
            .on_change(move |index| sink.borrow_mut().push(index))
            .unwrap();

        controller.next().unwrap();
        subscription.unsubscribe();
        controller.next().unwrap();

        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn panicking_observer_leaves_state_intact() {
        let mut controller = controller(3);
        controller.on_change(|_| panic!("observer failure")).unwrap();
        let seen = recorded(&mut controller);

        controller.next().unwrap();
        controller.next().unwrap();

        assert_eq!(controller.current_index(), 2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn disposed_controller_rejects_operations_and_stays_silent() {
        let mut controller = controller(3);
        let seen = recorded(&mut controller);
        controller.start().unwrap();
        controller.dispose().unwrap();

        assert_eq!(controller.state(), ControllerState::Disposed);
        assert_eq!(controller.next(), Err(CarouselError::Disposed));
        assert_eq!(controller.previous(), Err(CarouselError::Disposed));
        assert_eq!(controller.go_to(1), Err(CarouselError::Disposed));
        assert_eq!(controller.pause(), Err(CarouselError::Disposed));
        assert_eq!(controller.resume(), Err(CarouselError::Disposed));
        assert_eq!(controller.start(), Err(CarouselError::Disposed));
        assert_eq!(controller.dispose(), Err(CarouselError::Disposed));
        assert!(controller.on_change(|_| {}).is_err());

        controller.update(ms(10_000));
        assert_eq!(controller.current_index(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn three_and_a_half_periods_wrap_three_slides() {
        let mut controller = SlideshowController::create(vec!['A', 'B', 'C'], PERIOD).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        controller.on_change(move |index| sink.borrow_mut().push(index)).unwrap();
        controller.start().unwrap();

        controller.update(ms(3500));

        assert_eq!(controller.current_index(), 0);
        assert_eq!(*controller.active_slide(), 'A');
        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
        assert_eq!(controller.time_to_next_tick(), Some(ms(500)));
    }

    #[test]
    fn slide_lookup_is_bounds_checked() {
        let controller = SlideshowController::create(vec!["a", "b"], PERIOD).unwrap();
        assert_eq!(controller.slide(1), Ok(&"b"));
        assert_eq!(
            controller.slide(2),
            Err(CarouselError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(controller.len(), 2);
        assert_eq!(controller.slides(), &["a", "b"]);
    }
}
