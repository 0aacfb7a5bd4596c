/// A suggested experiment for someone learning from this model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub title: &'static str,
    pub task: &'static str,
    /// Command-line flag that performs the change, when one exists.
    pub flag: Option<&'static str>,
}

pub const EXERCISES: &[Exercise] = &[
    Exercise {
        title: "Problem 1",
        task: "Decrease/increase the number of units in the first hidden layer (originally 16) and compare.",
        flag: Some("--hidden1 N"),
    },
    Exercise {
        title: "Problem 2",
        task: "Decrease/increase the number of units in the second hidden layer (originally 16) and compare.",
        flag: Some("--hidden2 N"),
    },
    Exercise {
        title: "Problem 3",
        task: "Change the activation of the hidden layers (originally relu) and compare.",
        flag: Some("--activation sigmoid|tanh|linear|leaky_relu"),
    },
    Exercise {
        title: "Problem 4",
        task: "Change the optimizer (originally adam) and compare.",
        flag: Some("--optimizer sgd --learning-rate F"),
    },
    Exercise {
        title: "Problem 5",
        task: "Change the loss function (originally categorical_crossentropy) and compare.",
        flag: Some("--loss mse|mae|huber"),
    },
    Exercise {
        title: "Problem 6",
        task: "Remove one of the hidden layers and compare.",
        flag: Some("--hidden2 0"),
    },
    Exercise {
        title: "Challenge",
        task: "Add a dropout layer.",
        flag: None,
    },
    Exercise {
        title: "Challenge",
        task: "Add another hidden layer (edit the \"network\" section of a config file).",
        flag: Some("--config FILE"),
    },
    Exercise {
        title: "Challenge",
        task: "For every problem, explain why performance changed the way it did: \
               look for underfitting when the network gets very small, and overfitting when it gets large.",
        flag: None,
    },
    Exercise {
        title: "Final question",
        task: "What is the simplest model that reaches the highest test accuracy without over- or underfitting?",
        flag: None,
    },
];

/// The exercise list as printable text, preceded by what to look at.
pub fn render() -> String {
    let mut out = String::from(
        "Things to look at: training and test accuracy, the pattern of accuracy and of loss \
         across epochs, and whether the model over- or underfits (the plots help).\n\
         NOTE: keep the output layer at 2 units; this is a binary classification.\n\n",
    );
    for ex in EXERCISES {
        out.push_str(&format!("{}: {}\n", ex.title, ex.task));
        if let Some(flag) = ex.flag {
            out.push_str(&format!("    try: {}\n", flag));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_problem_with_its_flag() {
        let text = render();
        for n in 1..=6 {
            assert!(text.contains(&format!("Problem {}:", n)));
        }
        assert!(text.contains("--hidden2 0"));
        assert!(text.contains("keep the output layer at 2 units"));
    }
}
