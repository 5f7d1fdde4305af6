use toytext::*;

/// Plays one episode to the end, returning (observations, rewards).
#[allow(dead_code)]
pub fn play_out<E: Environment>(
    env: &mut E,
    mut action: impl FnMut(&E::State) -> Discrete,
) -> (Vec<E::State>, Vec<Continous>) {
    let mut s = env.reset();
    let mut obs = vec![s.clone()];
    let mut rewards = vec![];
    loop {
        let si = env.step(action(&s)).unwrap();
        obs.push(si.observation.clone());
        rewards.push(si.reward);
        if si.is_done() {
            break;
        }
        s = si.observation;
    }
    (obs, rewards)
}

#[allow(dead_code)]
pub fn total(rewards: &[Continous]) -> Continous {
    rewards.iter().sum()
}
